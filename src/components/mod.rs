mod detail_panel;
mod title_bar;

pub use detail_panel::DetailPanel;
pub use title_bar::TitleBar;
