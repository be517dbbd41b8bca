use log::info;
use clap::{Parser, Subcommand};

use super::cmd::{deriv, roots, shader};
use super::utils::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
#[clap(rename_all="lower")]
pub enum Cmd {
    Roots(roots::Args),
    Deriv(deriv::Args),
    Shader(shader::Args),
}

impl CliArgs { 
    fn log_level(&self) -> log::LevelFilter { 
        let level = match &self.command { 
            Cmd::Roots(args)  => args.log,
            Cmd::Deriv(args)  => args.log,
            Cmd::Shader(args) => args.log,
        };
        nova::util::log::level_for(level)
    }
}

pub struct App {
    pub args: CliArgs
}

impl App { 
    pub fn new() -> Self { 
        let args = CliArgs::parse();
        Self::new_with(args)
    }

    pub fn new_with(args: CliArgs) -> Self { 
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> { 
        self.init_logger();

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) {
        let l = self.args.log_level();
        if l != log::LevelFilter::Off { 
            // fails only if a logger is already set.
            nova::util::log::init_simple_logger(l).ok();
        }
    }

    pub fn dispatch(&self) -> Result<String, Box<dyn std::error::Error>> { 
        guard_panic(||
            match &self.args.command { 
                Cmd::Roots(args)  => roots::dispatch(args),
                Cmd::Deriv(args)  => deriv::dispatch(args),
                Cmd::Shader(args) => shader::dispatch(args),
            }
        )
    }
}
