pub mod browse;
pub mod favorite;
pub mod interactive;
pub mod note;
pub mod show;

pub use browse::*;
pub use favorite::*;
pub use interactive::execute_interactive;
pub use note::*;
pub use show::*;
