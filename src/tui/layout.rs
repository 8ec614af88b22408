/// Width breakpoints for layout decisions.
///
/// Render code asks for a breakpoint instead of comparing raw widths.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: everything stacked, terse hints
    Compact,
    /// 60-109 cols: stacked form and list
    Normal,
    /// 110+ cols: form and list side by side
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}
