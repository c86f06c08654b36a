//! Test helpers for building git repositories.

use bstr::ByteSlice;
use duct::cmd;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Convenience functions for working with directory-like things.
pub trait FsDirectory {
    /// Get the path to this directory.
    #[must_use]
    fn path(&self) -> &Path;

    /// Join a path to this.
    ///
    /// Equivalent to `dir.path().join(...)`.
    #[must_use]
    #[inline]
    fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.path().join(path)
    }

    /// Make a subdirectory.
    ///
    /// Creates all parent directories if necessary.
    fn mkdir<P: AsRef<Path>>(&self, path: P) {
        fs::create_dir_all(self.join(path)).unwrap();
    }

    /// Write a file.
    ///
    /// Creates all parent directories if necessary.
    fn write<P: AsRef<Path>>(&self, path: P, content: &str) {
        let path = self.join(path);
        self.mkdir(path.parent().unwrap());
        fs::write(path, content).unwrap();
    }

    /// Read a file into a `String`.
    fn read<P: AsRef<Path>>(&self, path: P) -> String {
        fs::read_to_string(self.join(path)).unwrap()
    }
}

/// The home directory for `git` operations.
#[derive(Debug)]
pub struct Home(PathBuf);

impl FsDirectory for Home {
    /// Get the path to the home directory.
    fn path(&self) -> &Path {
        &self.0
    }
}

impl Home {
    /// # Create a new home directory.
    ///
    /// ## `.gitconfig`
    ///
    /// `user.name` and `user.email` must be set for commits and annotated
    /// tags to work in GitHub actions. Having them set also helps to avoid
    /// confusing warnings, as do the settings in `advice`.
    ///
    /// If `init.defaultBranch` is not set, `git` gives a warning about the
    /// default branch being subject to change.
    ///
    /// # Panics
    ///
    ///   * It can’t create the directory at `path` and the directory doesn’t
    ///     already exist.
    ///   * It can’t write `{path}/.gitconfig`.
    pub fn init<P: Into<PathBuf>>(path: P) -> Self {
        let home = Self(path.into());
        home.write(
            ".gitconfig",
            "[user]\n\
            name = Name\n\
            email = name@example.com\n\
            [init]\n\
            defaultBranch = main\n\
            [tag]\n\
            gpgSign = false\n\
            [advice]\n\
            detachedHead = false\n",
        );
        home
    }

    /// Run `git` in the `cwd` directory and return its output.
    ///
    /// Prints `git` command line and working directory to stdout, followed by
    /// the output.
    ///
    /// # Panics
    ///
    /// Panics if the process fails, or if there was an actual IO error.
    pub fn git<P, I, S>(&self, cwd: P, args: I) -> String
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let shell_args =
            shell_words::join(args.iter().map(|arg| arg.to_string_lossy()));

        println!("`git {shell_args}` in {:?}", self.join(&cwd));
        let output = run_git(&self.0, cwd, args).run().unwrap();
        print!("{}", output.stdout.as_bstr());
        output.stdout.to_str_lossy().trim().to_owned()
    }

    /// Create a git repository.
    ///
    /// # Panics
    ///
    /// Panics if there was a problem creating the repository.
    pub fn git_init<P: AsRef<Path>>(&self, path: P) -> Repo<'_> {
        let path = self.join(path);
        self.git(&self.0, [o("init"), o(&path)]);
        Repo { home: self, repo: path }
    }
}

/// A git repo.
#[derive(Debug)]
pub struct Repo<'a> {
    /// The home directory `git` runs with.
    home: &'a Home,

    /// The working directory of the repo.
    repo: PathBuf,
}

impl FsDirectory for Repo<'_> {
    /// Get the path to this repo.
    fn path(&self) -> &Path {
        &self.repo
    }
}

impl Repo<'_> {
    /// Run `git` in the repo directory and return its output.
    ///
    /// # Panics
    ///
    /// Panics if the process fails, or if there was an actual IO error.
    pub fn git<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.home.git(&self.repo, args)
    }

    /// Make a commit with files a and b.
    ///
    /// Commit `n` is dated `n` minutes after 2020-01-01 00:00 UTC so that
    /// commits sort the same way every time. `n` must be less than 60.
    ///
    /// # Panics
    ///
    /// Panics if there was a problem creating the commit.
    pub fn make_commit(&self, n: u8) {
        assert!(n < 60, "commit number must be less than 60");
        let date = format!("2020-01-01 00:{n:02}:00 +0000");
        let message = format!("commit {n}");

        self.write("a", &format!("{n}a"));
        self.write("b", &format!("{n}b"));
        self.git(["add", "a", "b"]);

        // The committer date is what orders tags.
        println!("`git commit -m {message:?}` at {date} in {:?}", self.repo);
        let args = ["commit", "-m", message.as_str()];
        let output = run_git(self.home.path(), &self.repo, args)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .run()
            .unwrap();
        print!("{}", output.stdout.as_bstr());
    }

    /// Get the full commit id for a revision.
    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(["rev-parse", rev])
    }

    /// Get the short commit id for `HEAD`.
    pub fn short_head(&self) -> String {
        self.git(["rev-parse", "--short", "HEAD"])
    }
}

/// A logger that throws everything away.
#[must_use]
pub fn log() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// Convert something to an [`OsString`].
pub fn o<S: Into<OsString>>(input: S) -> OsString {
    input.into()
}

/// Set up a call to `git` in the `cwd` directory.
///
/// If `cwd` is relative, it will be interpreted in the context of `home`.
/// `home` should contain a `.gitconfig` file.
pub fn run_git<PH, PC, I, S>(home: PH, cwd: PC, args: I) -> duct::Expression
where
    PH: AsRef<Path>,
    PC: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let home: &Path = home.as_ref();
    cmd("git", args)
        .dir(home.join(cwd))
        .env("HOME", home)
        .env("GIT_CONFIG_GLOBAL", home.join(".gitconfig"))
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .stderr_to_stdout()
        .stdout_capture()
}
