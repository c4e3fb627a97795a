/// A named logging handle.
///
/// Components create one of these up front and log through it, so every
/// record carries the component name as its target.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
}

impl Logger {
    pub fn create(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        log::debug!(target: self.name.as_str(), "{}", message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        log::info!(target: self.name.as_str(), "{}", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        log::warn!(target: self.name.as_str(), "{}", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        log::error!(target: self.name.as_str(), "{}", message.as_ref());
    }
}
