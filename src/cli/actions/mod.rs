pub mod inspect;
pub mod issue;
pub mod revoke;

// The match over actions lives in `run` so this module only declares them.
mod run;

#[derive(Debug)]
pub enum Action {
    Issue(issue::Args),
    Revoke(revoke::Args),
    Inspect(inspect::Args),
}

impl Action {
    /// Execute the action and return what should be printed on stdout.
    /// # Errors
    /// Returns an error if the action fails.
    pub fn execute(self) -> anyhow::Result<String> {
        run::execute(self)
    }
}
