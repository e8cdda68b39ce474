pub mod change_soil_type;
pub mod get_planner_config;
pub mod get_planner_state;
pub mod list_soil_types;
pub mod recommend;
pub mod report_location;
pub mod reset_planner_state;
