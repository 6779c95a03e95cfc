pub mod dates;
pub mod experience;
pub mod red_flags;
pub mod verbs;
