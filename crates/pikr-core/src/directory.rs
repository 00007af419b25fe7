//! The application directory capability.
//!
//! Enumeration and launching belong to the host platform; the launcher only
//! consumes descriptors and hands them back when the user picks one.

use crate::descriptor::AppDescriptor;
use crate::error::LaunchError;

pub trait AppDirectory {
    /// Every installed application, in the order the platform reports them.
    fn list_all(&self) -> Vec<AppDescriptor>;

    /// Start the application behind `app`, passing `uris` as its arguments.
    fn launch(&self, app: &AppDescriptor, uris: &[&str]) -> Result<(), LaunchError>;
}

impl<D: AppDirectory + ?Sized> AppDirectory for Box<D> {
    fn list_all(&self) -> Vec<AppDescriptor> {
        (**self).list_all()
    }

    fn launch(&self, app: &AppDescriptor, uris: &[&str]) -> Result<(), LaunchError> {
        (**self).launch(app, uris)
    }
}
