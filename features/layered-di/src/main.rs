use layered_di::{
    demo,
    logging::{self, LogConfig},
};

fn main() {
    let config = LogConfig::from_env();
    if let Err(e) = logging::init(&config) {
        eprintln!("{e}");
    }

    let outcome = match demo::run() {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Demo failed: {e}");
            std::process::exit(1);
        }
    };

    println!("{}\n", outcome.wiring);
    println!("u1: {}", outcome.accepted);
    println!("u2: {}", outcome.denied);
}
