//! Stable list moves shared by section groups and child-block arrays.

/// Move the element at `from` to `to`, keeping every other element's
/// relative order. Returns false (and leaves the list alone) if either index
/// is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

/// Resolve a drag from `active` onto `over` to a `(from, to)` index pair
///
/// `None` when the ids are equal or either one is missing.
pub fn drag_indices<T>(items: &[T], active: &str, over: &str, id_of: impl Fn(&T) -> &str) -> Option<(usize, usize)> {
    if active == over {
        return None;
    }
    let from = items.iter().position(|item| id_of(item) == active)?;
    let to = items.iter().position(|item| id_of(item) == over)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward() {
        let mut items = vec!['A', 'B', 'C', 'D'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['B', 'C', 'A', 'D']);
    }

    #[test]
    fn test_move_backward() {
        let mut items = vec!['A', 'B', 'C', 'D'];
        assert!(move_item(&mut items, 3, 1));
        assert_eq!(items, vec!['A', 'D', 'B', 'C']);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut items = vec!['A', 'B'];
        assert!(!move_item(&mut items, 0, 2));
        assert!(!move_item(&mut items, 5, 0));
        assert_eq!(items, vec!['A', 'B']);
    }

    #[test]
    fn test_every_move_is_a_stable_permutation() {
        let original: Vec<u8> = (0..6).collect();

        for from in 0..original.len() {
            for to in 0..original.len() {
                let mut items = original.clone();
                move_item(&mut items, from, to);

                assert_eq!(items[to], original[from]);

                let mut rest: Vec<u8> = items.clone();
                rest.remove(to);
                let expected: Vec<u8> = original.iter().copied().filter(|v| *v != original[from]).collect();
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn test_drag_indices() {
        let items = vec!["a", "b", "c"];
        assert_eq!(drag_indices(&items, "a", "c", |s| *s), Some((0, 2)));
        assert_eq!(drag_indices(&items, "b", "b", |s| *s), None);
        assert_eq!(drag_indices(&items, "a", "zz", |s| *s), None);
    }
}
