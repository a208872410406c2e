//! Built-in exercise definitions.

use calma_core::{
    BreathingPattern, BreathingPhase, Palette, PhaseKind, Rgb, ValueRange, WavePattern,
};

/// violet-400
pub const ACCENT: Rgb = Rgb::new(167, 139, 250);

const QUESTION: &str = "Do you feel much better?";

fn palette(colors: &[(u8, u8, u8)]) -> Palette {
    let stops = colors.iter().copied().map(Rgb::from).collect();
    // The tables below are never empty.
    Palette::new(stops).unwrap_or_else(|_| Palette::solid(ACCENT))
}

fn phase(kind: PhaseKind, duration_ms: u64, palette: Palette, message: &str) -> BreathingPhase {
    BreathingPhase {
        kind,
        duration_ms,
        palette,
        message: message.to_string(),
    }
}

/// 4-4 breathing: blues while inhaling, teals and greens while exhaling,
/// with a short pause after each.
pub fn anxiety() -> BreathingPattern {
    let inhale = palette(&[
        (14, 165, 233),
        (56, 189, 248),
        (125, 211, 252),
        (6, 182, 212),
        (34, 211, 238),
        (103, 232, 249),
    ]);
    let exhale = palette(&[
        (103, 232, 249),
        (45, 212, 191),
        (20, 184, 166),
        (13, 148, 136),
        (16, 185, 129),
        (52, 211, 153),
    ]);
    let after_inhale = Palette::solid(inhale.last());
    let after_exhale = Palette::solid(exhale.last());

    BreathingPattern {
        phases: vec![
            phase(PhaseKind::Inhale, 4000, inhale, "Breathe in"),
            phase(PhaseKind::Pause, 500, after_inhale, "Breathe in"),
            phase(PhaseKind::Exhale, 4000, exhale, "Breathe out"),
            phase(PhaseKind::Pause, 500, after_exhale, "Breathe out"),
        ],
        cycles: 5,
        max_scale: 2.0,
        question: QUESTION.to_string(),
        success: "Now you are in control.".to_string(),
    }
}

/// 4-7-8 breathing: red while inhaling, through orange to yellow while
/// holding, across the spectrum to violet while exhaling.
pub fn anger() -> BreathingPattern {
    let red = palette(&[
        (127, 29, 29),
        (153, 27, 27),
        (185, 28, 28),
        (220, 38, 38),
        (239, 68, 68),
        (248, 113, 113),
    ]);
    let red_to_yellow = palette(&[
        (239, 68, 68),
        (234, 88, 12),
        (249, 115, 22),
        (251, 146, 60),
        (253, 186, 116),
        (251, 191, 36),
        (252, 211, 77),
        (250, 204, 21),
        (253, 224, 71),
    ]);
    let yellow_to_violet = palette(&[
        (253, 224, 71),
        (163, 230, 53),
        (74, 222, 128),
        (45, 212, 191),
        (34, 211, 238),
        (56, 189, 248),
        (96, 165, 250),
        (59, 130, 246),
        (99, 102, 241),
        (139, 92, 246),
        (167, 139, 250),
    ]);

    BreathingPattern {
        phases: vec![
            phase(PhaseKind::Inhale, 4000, red, "Breathe in"),
            phase(PhaseKind::Hold, 7000, red_to_yellow, "Hold"),
            phase(PhaseKind::Exhale, 8000, yellow_to_violet, "Breathe out"),
        ],
        cycles: 2,
        max_scale: 2.0,
        question: QUESTION.to_string(),
        success: "Now you are in control.".to_string(),
    }
}

/// Thirty seconds of waves settling from orange chaos into teal and lavender.
pub fn stress() -> WavePattern {
    WavePattern {
        duration_ms: 30_000,
        wave_count: 5,
        chaos: ValueRange::new(1.0, 0.05),
        speed: ValueRange::new(3.0, 0.5),
        amplitude: ValueRange::new(80.0, 30.0),
        chaos_palette: palette(&[(194, 65, 12), (234, 88, 12), (249, 115, 22), (251, 146, 60)]),
        calm_palette: palette(&[
            (45, 212, 191),
            (94, 234, 212),
            (167, 139, 250),
            (196, 181, 253),
        ]),
        start_message: "Watch the waves...".to_string(),
        middle_message: "Feel them settle...".to_string(),
        end_message: "Mental clarity".to_string(),
        question: QUESTION.to_string(),
        success: "Your mind is calm.".to_string(),
    }
}
