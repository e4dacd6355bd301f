pub mod errors;
pub mod matchup;
pub mod params;
pub mod team_form;
pub mod training_set;
