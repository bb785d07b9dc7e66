pub mod ad;
pub mod quiz;
