use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = filex::cli::parse();
    app::run(args)
}
