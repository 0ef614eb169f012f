pub mod ops_pin;
pub mod ops_report;
pub mod ops_run;
pub mod ops_setup;
pub mod ops_tree;
