//! Built-in default exclude rules

/// Default rule text, parsed with the same grammar as a user ignore file.
///
/// These rules always come first in a [`RuleSet`](super::RuleSet), so any
/// later rule (config or ignore file) can re-include a path with `!`.
pub const DEFAULT_EXCLUDES: &str = "\
# Version control metadata
.git/
.hg/
.svn/
.bzr/

# Dependency and build output
node_modules/
target/
build/
dist/
out/
.gradle/
__pycache__/
.venv/
.tox/

# Editor and OS clutter
.idea/
.vscode/
.DS_Store

# Logs and compiled artifacts
*.log
*.class
*.jar
*.o
*.a
*.so
*.dylib
*.dll
*.exe
*.pyc
";
