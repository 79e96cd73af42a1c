pub mod presentation_state;
