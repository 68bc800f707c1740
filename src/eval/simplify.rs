use std::env;
use std::error::Error;
use std::path::PathBuf;

use analyzer_lib::simplify;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let dir = args
        .next()
        .ok_or("You should specify exactly one trace directory")?;
    if args.next().is_some() {
        return Err("You should specify exactly one trace directory".into());
    }

    simplify::simplify_dir(&PathBuf::from(dir))?;

    Ok(())
}
