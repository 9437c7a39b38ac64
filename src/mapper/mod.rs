mod column;
#[allow(clippy::module_inception)]
mod mapper;


pub use column::{AmountSource, Column, ThisAccount};
pub use mapper::Mapper;
