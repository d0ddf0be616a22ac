use crate::core::env::EnvError;
use std::borrow::Cow;

#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Replaces a leading `~` with `home`, keeping the rest of the argument as is.
    ///
    /// `~` becomes `$HOME` and `~/src` becomes `$HOME/src`. There is no `~user`
    /// lookup, so `~bob` becomes `$HOMEbob`.
    pub fn expand<'a>(&self, path: &'a str, home: Option<&str>) -> Result<Cow<'a, str>, EnvError> {
        match path.strip_prefix('~') {
            Some(rest) => {
                let home = home.ok_or(EnvError::HomeDirNotFound)?;
                Ok(Cow::Owned(format!("{}{}", home, rest)))
            }
            None => Ok(Cow::Borrowed(path)),
        }
    }
}
