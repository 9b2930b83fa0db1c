use datepick::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
