use vergen_gitcl::{Emitter, GitclBuilder};

// Provides VERGEN_GIT_BRANCH and VERGEN_GIT_SHA for `nextar --version`
fn main() -> anyhow::Result<()> {
    let git = GitclBuilder::default().sha(true).branch(true).build()?;

    Emitter::default().add_instructions(&git)?.emit()?;

    Ok(())
}
