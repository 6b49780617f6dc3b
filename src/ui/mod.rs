/// UI layer: top bar and side panel, the table tab, and the statistics tab.

pub mod charts;
pub mod panels;
pub mod table;
