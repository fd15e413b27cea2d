mod common;
mod dashboard;
mod roi;
