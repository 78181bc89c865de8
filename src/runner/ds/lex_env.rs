use crate::runner::ds::env_record::DeclarativeEnvironmentRecord;
use std::cell::RefCell;
use std::rc::Rc;

/// One frame of the scope chain. Frames are shared: closures keep the frame
/// they were created in alive, and see every later change made to it.
pub struct LexEnvironment {
    pub inner: DeclarativeEnvironmentRecord,
    pub outer: Option<LexEnvironmentRef>,
}

pub type LexEnvironmentRef = Rc<RefCell<LexEnvironment>>;
