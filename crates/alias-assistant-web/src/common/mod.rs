pub mod route;

pub mod snackbar;
