// Application layer: consumers of the API port (reports, example flows).

pub mod report;
pub mod walkthrough;
