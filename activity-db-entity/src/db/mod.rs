pub mod token_activity;
