use crate::core::model::TextObservation;

/// Trims recognized text and drops fragments the layout pass cannot use:
/// blank text or a baseline without finite x coordinates.
pub fn sanitize(observations: Vec<TextObservation>) -> Vec<TextObservation> {
    observations
        .into_iter()
        .filter(|obs| obs.quad.has_readable_baseline())
        .filter_map(|mut obs| {
            let trimmed = obs.text.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.len() != obs.text.len() {
                obs.text = trimmed.to_string();
            }
            Some(obs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;

    fn obs(text: &str) -> TextObservation {
        TextObservation::new(text, BBox::new(0.1, 0.1, 0.5, 0.2).to_quad())
    }

    #[test]
    fn trims_and_drops_blank_text() {
        let cleaned = sanitize(vec![obs("  Hello \n"), obs(""), obs(" \t "), obs("World")]);
        let texts: Vec<_> = cleaned.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, ["Hello", "World"]);
    }

    #[test]
    fn drops_unreadable_geometry() {
        let mut broken = obs("Lost");
        broken.quad.bottom_left.x = f64::INFINITY;
        let cleaned = sanitize(vec![broken, obs("Kept")]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "Kept");
    }
}
