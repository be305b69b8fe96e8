pub(crate) mod descriptor;
pub(crate) mod timing;
pub(crate) mod value;
