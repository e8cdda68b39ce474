pub mod diagnose_crop;
pub mod get_latest_diagnosis;
pub mod reset_diagnosis;
