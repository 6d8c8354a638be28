//! Presentation side: chart specifications, the chart builders, and the
//! declarative page layout.

pub mod chart;
pub mod panels;
pub mod plot;
