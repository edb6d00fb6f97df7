//! Placement of the floating widgets on the screen

use ratatui::layout::Rect;

const MARGIN: u16 = 1;
const LAUNCHER_WIDTH: u16 = 12;
const LAUNCHER_HEIGHT: u16 = 3;
const PANEL_WIDTH: u16 = 50;
const PANEL_HEIGHT: u16 = 26;

/// Bottom-right corner, inset by the margin
pub fn launcher_area(screen: Rect) -> Rect {
    anchored(screen, LAUNCHER_WIDTH, LAUNCHER_HEIGHT, MARGIN)
}

/// Panel sits above where the launcher would be, shrinking on small screens
pub fn panel_area(screen: Rect) -> Rect {
    let bottom_gap = MARGIN + LAUNCHER_HEIGHT;
    let width = PANEL_WIDTH.min(screen.width.saturating_sub(2 * MARGIN));
    let height = PANEL_HEIGHT.min(screen.height.saturating_sub(bottom_gap + MARGIN));

    // Too short to leave room for the launcher row: use the space anyway.
    if height < 8 {
        let height = screen.height.saturating_sub(2 * MARGIN);
        return anchored(screen, width, height, MARGIN);
    }
    anchored(screen, width, height, bottom_gap)
}

fn anchored(screen: Rect, width: u16, height: u16, bottom: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let x = screen.x + screen.width.saturating_sub(width + MARGIN);
    let y = screen.y + screen.height.saturating_sub(height + bottom);
    Rect::new(x, y, width, height)
}
