mod command;
mod logger;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
