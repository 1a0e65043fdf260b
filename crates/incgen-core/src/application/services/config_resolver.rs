//! Config Resolver - turns raw flags into an immutable [`ModuleContext`].

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainError, ModuleContext, ModuleName, Prefix, Style},
    error::IncgenResult,
};

/// Generation flags exactly as the user supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFlags {
    pub name: Option<String>,
    pub dir: bool,
    pub once: bool,
    pub public_only: bool,
    pub add: Option<String>,
}

/// Resolves [`RawFlags`] against the working directory.
pub struct ConfigResolver<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Validate the flags and build the run's context.
    ///
    /// The working directory is only consulted when `dir` is set.
    pub fn resolve(&self, flags: &RawFlags, style: Style) -> IncgenResult<ModuleContext> {
        if flags.name.is_some() && flags.dir {
            return Err(DomainError::ConflictingInputs {
                first: "name",
                second: "dir",
            }
            .into());
        }

        let name = match (&flags.name, flags.dir) {
            (Some(name), _) => Some(ModuleName::new(name.as_str())?),
            (None, true) => Some(self.directory_name()?),
            (None, false) => None,
        };

        let mut builder = ModuleContext::builder()
            .maybe_name(name)
            .once_guard(flags.once)
            .public_only(flags.public_only)
            .style(style);

        if let Some(add) = &flags.add {
            if flags.public_only {
                debug!("add mode generates a single tier; --pub has no effect");
            }
            builder = builder.add_prefix(Prefix::new(add.as_str())?);
        }

        let ctx = builder.build();
        debug!(
            name = ctx.name().map(ModuleName::as_str).unwrap_or("-"),
            scope = ?ctx.scope(),
            prefix = %ctx.prefix(),
            "Resolved module context"
        );
        Ok(ctx)
    }

    fn directory_name(&self) -> IncgenResult<ModuleName> {
        let cwd = self.filesystem.current_dir()?;
        let base = cwd
            .file_name()
            .ok_or_else(|| ApplicationError::WorkingDirectoryUnavailable {
                reason: format!("{} has no base name", cwd.display()),
            })?;
        let base = base
            .to_str()
            .ok_or_else(|| ApplicationError::WorkingDirectoryUnavailable {
                reason: format!("{} is not valid UTF-8", cwd.display()),
            })?;
        Ok(ModuleName::new(base)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::Scope;
    use crate::error::IncgenError;
    use std::path::PathBuf;

    fn fs_at(dir: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir()
            .returning(move || Ok(PathBuf::from(dir)));
        fs
    }

    fn flags() -> RawFlags {
        RawFlags::default()
    }

    #[test]
    fn name_and_dir_conflict() {
        let fs = MockFilesystem::new();
        let err = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    name: Some("foo".into()),
                    dir: true,
                    ..flags()
                },
                Style::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IncgenError::Domain(DomainError::ConflictingInputs { .. })
        ));
    }

    #[test]
    fn dir_uses_base_name_of_working_directory() {
        let fs = fs_at("/home/dev/netcore");
        let ctx = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    dir: true,
                    ..flags()
                },
                Style::default(),
            )
            .unwrap();
        assert_eq!(ctx.name().unwrap().as_str(), "netcore");
    }

    #[test]
    fn dir_at_root_has_no_name() {
        let fs = fs_at("/");
        let err = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    dir: true,
                    ..flags()
                },
                Style::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IncgenError::Application(ApplicationError::WorkingDirectoryUnavailable { .. })
        ));
    }

    #[test]
    fn unreadable_working_directory_is_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir().returning(|| {
            Err(ApplicationError::WorkingDirectoryUnavailable {
                reason: "No such file or directory".into(),
            }
            .into())
        });
        let result = ConfigResolver::new(&fs).resolve(
            &RawFlags {
                dir: true,
                ..flags()
            },
            Style::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn working_directory_not_read_without_dir_flag() {
        let mut fs = MockFilesystem::new();
        fs.expect_current_dir().never();
        let ctx = ConfigResolver::new(&fs)
            .resolve(&flags(), Style::default())
            .unwrap();
        assert!(ctx.name().is_none());
        assert_eq!(ctx.scope(), Scope::Full);
    }

    #[test]
    fn empty_add_is_rejected() {
        let fs = MockFilesystem::new();
        let err = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    add: Some(String::new()),
                    ..flags()
                },
                Style::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IncgenError::Domain(DomainError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn add_switches_to_add_mode_even_with_pub() {
        let fs = MockFilesystem::new();
        let ctx = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    add: Some("xxx".into()),
                    public_only: true,
                    ..flags()
                },
                Style::default(),
            )
            .unwrap();
        assert_eq!(ctx.scope(), Scope::Add);
        assert_eq!(ctx.prefix().as_str(), "xxx");
    }

    #[test]
    fn once_and_pub_are_carried() {
        let fs = MockFilesystem::new();
        let ctx = ConfigResolver::new(&fs)
            .resolve(
                &RawFlags {
                    name: Some("bar".into()),
                    once: true,
                    public_only: true,
                    ..flags()
                },
                Style::default(),
            )
            .unwrap();
        assert!(ctx.once_guard());
        assert_eq!(ctx.scope(), Scope::PublicOnly);
        assert_eq!(ctx.prefix().as_str(), "pub");
    }

    #[test]
    fn name_with_separator_is_rejected() {
        let fs = MockFilesystem::new();
        let result = ConfigResolver::new(&fs).resolve(
            &RawFlags {
                name: Some("../escape".into()),
                ..flags()
            },
            Style::default(),
        );
        assert!(matches!(
            result,
            Err(IncgenError::Domain(DomainError::InvalidModuleName { .. }))
        ));
    }
}
