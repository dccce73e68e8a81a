//! Pure layout helpers shared by the essay and template grids.

/// Cards per row on the saved-essay screen.
pub const ESSAY_GRID_COLUMNS: usize = 2;

const NARROW_MAX_WIDTH: f64 = 480.0;
const MEDIUM_MAX_WIDTH: f64 = 768.0;

/// Returns a copy of `items` with the most recently appended item first.
pub fn newest_first<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

/// Partitions `items` into rows of `columns`, keeping order.
///
/// The last row holds the remainder when `items.len()` is not a multiple of
/// `columns`. A `columns` of zero is treated as one.
pub fn chunk_rows<T: Clone>(items: &[T], columns: usize) -> Vec<Vec<T>> {
    items
        .chunks(columns.max(1))
        .map(<[T]>::to_vec)
        .collect()
}

/// Template grid column count for a viewport width.
///
/// Boundaries belong to the lower bracket: `480 -> 1`, `768 -> 2`.
pub fn template_columns(width: f64) -> usize {
    if width > MEDIUM_MAX_WIDTH {
        4
    } else if width > NARROW_MAX_WIDTH {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::{chunk_rows, newest_first, template_columns};

    #[test]
    fn reverse_then_chunk_pairs() {
        let rows = chunk_rows(&newest_first(&["e1", "e2", "e3"]), 2);
        assert_eq!(rows, vec![vec!["e3", "e2"], vec!["e1"]]);
    }

    #[test]
    fn chunking_empty_yields_no_rows() {
        let rows = chunk_rows::<u8>(&[], 2);
        assert!(rows.is_empty());
    }

    #[test]
    fn zero_columns_behaves_like_one() {
        assert_eq!(chunk_rows(&[1, 2], 0), vec![vec![1], vec![2]]);
    }

    #[test]
    fn column_count_brackets() {
        assert_eq!(template_columns(400.0), 1);
        assert_eq!(template_columns(480.0), 1);
        assert_eq!(template_columns(500.0), 2);
        assert_eq!(template_columns(768.0), 2);
        assert_eq!(template_columns(800.0), 4);
        assert_eq!(template_columns(0.0), 1);
    }
}
