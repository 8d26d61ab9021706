// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use clap::{Args, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use ff::format::Carrier;
use ff::parse::parse_native;
use ff::report::Breakdown;

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// 16-bit half precision
    #[arg(short = 'h', long, value_name = "HALF", allow_hyphen_values = true)]
    half: Option<String>,

    /// 32-bit single precision
    #[arg(short = 'f', long = "float", value_name = "FLOAT", allow_hyphen_values = true)]
    single: Option<String>,

    /// 64-bit double precision
    #[arg(short = 'd', long, value_name = "DOUBLE", allow_hyphen_values = true)]
    double: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "ff",
    about = "Shows the encoding of a value in half, single and double precision",
    after_help = "Floats can be entered in hex integer, hex float, fixed point float, \
                  or scientific float formats",
    disable_help_flag = true
)]
struct Opt {
    #[command(flatten)]
    input: Input,

    /// Displays this message and exit
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

fn parse_as<T: Carrier>(text: &str) -> Result<f64> {
    let native = parse_native::<T>(text)
        .wrap_err_with(|| format!("Cannot parse {text:?} as a {} value", T::WIDTH))?;
    Ok(native.into())
}

impl Input {
    fn value(&self) -> Result<f64> {
        match (&self.half, &self.single, &self.double) {
            (Some(text), _, _) => parse_as::<u16>(text),
            (_, Some(text), _) => parse_as::<u32>(text),
            (_, _, Some(text)) => parse_as::<u64>(text),
            (None, None, None) => Err(eyre!("Expected one of --half, --float or --double")),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    let value = opt.input.value()?;
    println!("{}", Breakdown::new(value));
    Ok(())
}
