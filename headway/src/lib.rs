//! batch application for the headway transit data preparation pipeline:
//! reads snapshot csv files, runs the headway-core computations, and
//! upserts the derived relations back to csv by primary key.
pub mod app;
pub mod store;
