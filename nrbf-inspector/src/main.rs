/*!
 A command line tool that decodes MS-NRBF payloads, the binary serialization used by
 .NET Remoting, into JSON or a plain-text record listing.
*/

mod app;
mod exporters;

use std::process::exit;

use app::{
    options::{from_command_line, Options},
    runtime::Config,
};

fn main() {
    let args = from_command_line();
    match Options::from_args(&args) {
        Ok(options) => match Config::new(options) {
            Ok(config) => {
                if let Err(why) = config.run() {
                    eprintln!("Unable to decode: {why}");
                    exit(1);
                }
            }
            Err(why) => {
                eprintln!("Unable to load input: {why}");
                exit(1);
            }
        },
        Err(why) => {
            eprintln!("{why}");
            exit(1);
        }
    }
}
