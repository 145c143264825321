use std::collections::HashMap;

use super::{day_key, project, CourseBlock, DisplayWindow, PositionedSegment, GRID_DAYS};

/// Marker carried by every overlay `render` inserts; `render` clears these and only these.
pub const COURSE_MARKER: &str = "calendar-course";

/// Address of one grid cell: day column and hour row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellHandle {
    pub column: usize,
    pub row: usize,
}

/// Finds the cell for a `(day_key, hour_label)` pair, e.g. `("mon", "10:00 AM")`
pub trait CellLocator {
    fn locate(&self, day_key: &str, hour_label: &str) -> Option<CellHandle>;
}

/// Something segments can be drawn into
pub trait RenderTarget: CellLocator {
    /// Remove every overlay carrying `marker`
    fn clear_marked(&mut self, marker: &str);
    fn insert(&mut self, cell: CellHandle, overlay: Overlay);
}

/// An element placed inside a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub marker: String,
    pub segment: PositionedSegment,
}

/// Replace all course overlays on `target` with a fresh projection of `blocks`.
///
/// Segments whose day has no column are dropped. Returns how many overlays were
/// inserted. Calling twice with the same input leaves the same state as once.
pub fn render<T: RenderTarget>(target: &mut T, blocks: &[CourseBlock], window: DisplayWindow) -> usize {
    target.clear_marked(COURSE_MARKER);

    let mut inserted = 0;
    for segment in project(blocks, window) {
        let Some(cell) = target.locate(&segment.day_key, &segment.hour_label) else {
            log::debug!(
                "no cell for course {:?} at ({}, {})",
                segment.course_id,
                segment.day_key,
                segment.hour_label
            );
            continue;
        };

        target.insert(
            cell,
            Overlay {
                marker: COURSE_MARKER.to_string(),
                segment,
            },
        );
        inserted += 1;
    }

    inserted
}

/// In-memory weekly grid: one column per day in `GRID_DAYS`, one row per label.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    window: DisplayWindow,
    day_keys: Vec<String>,
    row_labels: Vec<String>,
    day_index: HashMap<String, usize>,
    row_index: HashMap<String, usize>,
    cells: Vec<Vec<Overlay>>,
}

impl ScheduleGrid {
    pub fn new(window: DisplayWindow) -> Self {
        let day_keys: Vec<String> = GRID_DAYS.iter().map(|d| day_key(*d)).collect();
        let row_labels = window.row_labels();

        let day_index = day_keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        let row_index = row_labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        let cells = vec![Vec::new(); day_keys.len() * row_labels.len()];

        Self {
            window,
            day_keys,
            row_labels,
            day_index,
            row_index,
            cells,
        }
    }

    pub fn window(&self) -> DisplayWindow {
        self.window
    }

    pub fn day_keys(&self) -> &[String] {
        &self.day_keys
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn columns(&self) -> usize {
        self.day_keys.len()
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Overlays in a cell, in insertion order
    pub fn cell(&self, cell: CellHandle) -> &[Overlay] {
        self.slot(cell).map(|i| self.cells[i].as_slice()).unwrap_or(&[])
    }

    /// All overlays with their cells, column-major
    pub fn overlays(&self) -> impl Iterator<Item = (CellHandle, &Overlay)> {
        let rows = self.rows();
        self.cells.iter().enumerate().flat_map(move |(i, items)| {
            let handle = CellHandle {
                column: i / rows,
                row: i % rows,
            };
            items.iter().map(move |overlay| (handle, overlay))
        })
    }

    pub fn overlay_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    fn slot(&self, cell: CellHandle) -> Option<usize> {
        if cell.column >= self.columns() || cell.row >= self.rows() {
            return None;
        }
        Some(cell.column * self.rows() + cell.row)
    }
}

impl CellLocator for ScheduleGrid {
    fn locate(&self, day_key: &str, hour_label: &str) -> Option<CellHandle> {
        let column = *self.day_index.get(day_key)?;
        let row = *self.row_index.get(hour_label)?;
        Some(CellHandle { column, row })
    }
}

impl RenderTarget for ScheduleGrid {
    fn clear_marked(&mut self, marker: &str) {
        for items in &mut self.cells {
            items.retain(|o| o.marker != marker);
        }
    }

    fn insert(&mut self, cell: CellHandle, overlay: Overlay) {
        if let Some(i) = self.slot(cell) {
            self.cells[i].push(overlay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SegmentRole;

    fn course(id: &str, days: &[&str], start: &str, end: &str) -> CourseBlock {
        CourseBlock {
            id: id.to_string(),
            days: days.iter().map(|d| d.to_string()).collect(),
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn grid_is_seven_by_seventeen() {
        let grid = ScheduleGrid::new(DisplayWindow::default());
        assert_eq!(grid.columns(), 7);
        assert_eq!(grid.rows(), 17);
        assert_eq!(grid.locate("sun", "7:00 AM"), Some(CellHandle { column: 0, row: 0 }));
        assert_eq!(grid.locate("sat", "11:00 PM"), Some(CellHandle { column: 6, row: 16 }));
        assert_eq!(grid.locate("Mon", "7:00 AM"), None);
        assert_eq!(grid.locate("mon", "6:00 AM"), None);
    }

    #[test]
    fn render_places_segments_in_cells() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        let blocks = vec![course("MATH301", &["Tue"], "9:30 AM", "12:00 PM")];

        assert_eq!(render(&mut grid, &blocks, DisplayWindow::default()), 1);

        let cell = grid.locate("tue", "9:00 AM").unwrap();
        let items = grid.cell(cell);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].marker, COURSE_MARKER);
        assert_eq!(items[0].segment.top_percent, 50.0);
        assert_eq!(items[0].segment.height_percent, 250.0);
        assert_eq!(items[0].segment.role, SegmentRole::Start);

        // rows the block overflows into stay empty
        let below = grid.locate("tue", "10:00 AM").unwrap();
        assert!(grid.cell(below).is_empty());
    }

    #[test]
    fn render_is_idempotent() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        let blocks = vec![
            course("A", &["Mon", "Wed"], "10:00 AM", "11:15 AM"),
            course("B", &["Fri"], "1:00 PM", "3:00 PM"),
        ];

        render(&mut grid, &blocks, DisplayWindow::default());
        let first: Vec<(CellHandle, Overlay)> = grid.overlays().map(|(c, o)| (c, o.clone())).collect();
        render(&mut grid, &blocks, DisplayWindow::default());
        let second: Vec<(CellHandle, Overlay)> = grid.overlays().map(|(c, o)| (c, o.clone())).collect();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn rerender_discards_previous_courses() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        render(&mut grid, &[course("OLD", &["Mon"], "8:00 AM", "9:00 AM")], DisplayWindow::default());
        render(&mut grid, &[course("NEW", &["Thu"], "8:00 AM", "9:00 AM")], DisplayWindow::default());

        let ids: Vec<&str> = grid.overlays().map(|(_, o)| o.segment.course_id.as_str()).collect();
        assert_eq!(ids, ["NEW"]);

        render(&mut grid, &[], DisplayWindow::default());
        assert_eq!(grid.overlay_count(), 0);
    }

    #[test]
    fn clearing_leaves_foreign_overlays() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        let cell = grid.locate("mon", "8:00 AM").unwrap();
        let pinned = Overlay {
            marker: "pinned-note".to_string(),
            segment: project(&[course("NOTE", &["Mon"], "8:00 AM", "8:30 AM")], DisplayWindow::default())
                .remove(0),
        };
        grid.insert(cell, pinned);

        render(&mut grid, &[course("CS1", &["Mon"], "8:00 AM", "9:00 AM")], DisplayWindow::default());
        assert_eq!(grid.cell(cell).len(), 2);
        assert_eq!(grid.cell(cell)[0].marker, "pinned-note");

        grid.clear_marked(COURSE_MARKER);
        assert_eq!(grid.cell(cell).len(), 1);
    }

    #[test]
    fn unknown_day_is_dropped() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        let blocks = vec![course("X", &["Mon", "Funday"], "8:00 AM", "9:00 AM")];
        assert_eq!(render(&mut grid, &blocks, DisplayWindow::default()), 1);
    }

    #[test]
    fn overlapping_courses_share_a_cell_in_order() {
        let mut grid = ScheduleGrid::new(DisplayWindow::default());
        let blocks = vec![
            course("FIRST", &["Wed"], "10:00 AM", "11:00 AM"),
            course("SECOND", &["Wed"], "10:30 AM", "11:30 AM"),
        ];
        render(&mut grid, &blocks, DisplayWindow::default());

        let cell = grid.locate("wed", "10:00 AM").unwrap();
        let ids: Vec<&str> = grid.cell(cell).iter().map(|o| o.segment.course_id.as_str()).collect();
        assert_eq!(ids, ["FIRST", "SECOND"]);
    }
}
