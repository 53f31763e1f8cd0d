use std::cmp::Ordering;

use crate::config::ReadingOrder;
use crate::core::model::TextObservation;

/// Puts fragments into the order the reconstructor should read them.
///
/// `Engine` trusts the recognizer's emission order. `Geometric` sorts top to
/// bottom, then left to right, keeping engine order for exact ties.
pub fn arrange(observations: &mut [TextObservation], order: ReadingOrder) {
    match order {
        ReadingOrder::Engine => {}
        ReadingOrder::Geometric => observations.sort_by(top_down),
    }
}

fn top_down(a: &TextObservation, b: &TextObservation) -> Ordering {
    let (a, b) = (a.quad.top_left, b.quad.top_left);
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;

    fn at(text: &str, x: f64, y: f64) -> TextObservation {
        TextObservation::new(text, BBox::new(x, y, x + 0.3, y + 0.05).to_quad())
    }

    fn texts(observations: &[TextObservation]) -> Vec<&str> {
        observations.iter().map(|o| o.text.as_str()).collect()
    }

    #[test]
    fn engine_order_is_left_alone() {
        let mut obs = vec![at("second", 0.1, 0.5), at("first", 0.1, 0.1)];
        arrange(&mut obs, ReadingOrder::Engine);
        assert_eq!(texts(&obs), ["second", "first"]);
    }

    #[test]
    fn geometric_order_sorts_rows_then_columns() {
        let mut obs = vec![
            at("c", 0.1, 0.5),
            at("b", 0.6, 0.1),
            at("a", 0.1, 0.1),
            at("d", 0.1, 0.5),
        ];
        arrange(&mut obs, ReadingOrder::Geometric);
        assert_eq!(texts(&obs), ["a", "b", "c", "d"]);
    }
}
