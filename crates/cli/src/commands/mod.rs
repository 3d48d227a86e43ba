pub mod launch;
pub mod launchers;
pub mod run;
pub mod study;
pub mod trajectory;
