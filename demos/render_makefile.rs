use makefile_generator::{Entry, Makefile, Template};
use tracing_subscriber::EnvFilter;

const EXAMPLE: &str = "\
# Project settings
APP=server
GOFLAGS=-trimpath ## passed to every go build

ifeq ($(OS),Windows_NT)
EXT=.exe
else
EXT=
endif

build: ## Build the binary
\tgo build $(GOFLAGS) -o bin/$(APP)$(EXT) ./cmd/$(APP)

test: build ## Run the test suite
\tgo test ./...
\tgo vet ./...

define BANNER
$(APP) build helpers
endef";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut makefile = Makefile::parse(EXAMPLE).expect("failed to parse makefile");

    println!("=== Parsed Entries ===");
    for (i, entry) in makefile.entries.iter().enumerate() {
        if entry.is_placeholder() {
            continue;
        }
        println!("{:>2} {:<10} {}", i, entry.kind(), entry.name());
        if !entry.dependents().is_empty() {
            println!("   dependents: {}", entry.dependents());
        }
        if !entry.comment().is_empty() {
            println!("   comment:    {}", entry.comment());
        }
        for line in entry.recipe_lines() {
            println!("   recipe:     {}", line);
        }
        if !entry.raw_block().is_empty() {
            println!("   block:      {} lines", entry.raw_block().lines().count());
        }
    }

    makefile.add_help_target();
    makefile.push(Entry::default());
    let mut clean = Entry::target("clean", "").with_comment("Remove build output");
    clean.append_recipe_line("rm -rf bin");
    makefile.push(clean);
    makefile.add_template(Template::Env);

    println!("\n=== Rendered Back ===");
    println!("{}", makefile);
}
