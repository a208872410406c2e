//! Styling of the breathing circle element.

use calma_core::{CircleStyle, Result, Rgb};

use crate::dom::Element;

/// Apply the breathing-circle look to `circle`: scale transform, two-tone
/// ring background and the glow shadow stack.
///
/// Fails without touching the element when `max_scale` is zero or not
/// finite.
pub fn update_circle_style(
    circle: &mut Element,
    color: Rgb,
    scale: f64,
    max_scale: f64,
) -> Result<CircleStyle> {
    let style = CircleStyle::new(color, scale, max_scale)?;
    circle.set_style("transform", style.transform_css());
    circle.set_style("background", style.background_css());
    circle.set_style("box-shadow", style.box_shadow_css());
    Ok(style)
}

#[cfg(test)]
mod tests {
    use calma_core::Error;

    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_styles_applied() {
        let mut doc = Document::new();
        let id = doc.create_element("div");
        let circle = doc.element_mut(id).unwrap();

        let style = update_circle_style(circle, Rgb::new(34, 211, 238), 2.0, 2.0).unwrap();
        assert_eq!(style.glow, 1.0);
        assert_eq!(circle.style("transform"), Some("scale(2)"));
        assert_eq!(
            circle.style("box-shadow"),
            Some(
                "0 0 50px rgba(34, 211, 238, 0.7), 0 0 100px rgba(34, 211, 238, 0.5), \
                 0 0 150px rgba(34, 211, 238, 0.3), inset 0 0 50px rgba(34, 211, 238, 0.3)"
            )
        );
        assert!(
            circle
                .style("background")
                .unwrap()
                .contains("linear-gradient(135deg, rgb(34, 211, 238), rgb(74, 251, 255))")
        );
    }

    #[test]
    fn test_zero_max_scale_leaves_element_untouched() {
        let mut doc = Document::new();
        let id = doc.create_element("div");
        let circle = doc.element_mut(id).unwrap();
        circle.set_style("transform", "scale(1)");

        let result = update_circle_style(circle, Rgb::WHITE, 1.0, 0.0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(circle.style("transform"), Some("scale(1)"));
        assert_eq!(circle.style("box-shadow"), None);
    }
}
