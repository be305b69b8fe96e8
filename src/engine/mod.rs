pub(crate) mod beam;
pub(crate) mod indicator;
pub(crate) mod keyframes;
pub(crate) mod state;
