//! Screen layout: named region tree, panel compositor, style strings.

pub mod compositor;
pub mod region;
pub mod style;

pub use compositor::{LayoutCompositor, Panel};
pub use region::{Region, RegionSize};
pub use style::{parse_color, parse_style};
