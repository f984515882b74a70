pub mod classify;
pub mod leadtime;
pub mod project;
pub mod route;
