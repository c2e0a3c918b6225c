use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
    let max_level = if logger.log_allocation { LevelFilter::Debug } else { LevelFilter::Info };
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(max_level))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    pub log_occupancy: bool,
    pub log_timings: bool,
    pub log_allocation: bool,
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target() {
            "" => true,
            "occupancy" => self.log_occupancy,
            "timings" => self.log_timings,
            "allocation" => self.log_allocation,
            target => {
                let chunks: Vec<&str> = target.split("::").collect();
                match chunks[..] {
                    ["vdp2cycp", ..] => metadata.level() <= Level::Info,
                    _ => false,
                }
            }
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                print!("{} - ", record.level());
            }

            match record.target() {
                "occupancy" => print!("OCCUPANCY "),
                "timings" => print!("TIMINGS "),
                "allocation" => print!("ALLOCATION "),
                _ => {}
            }

            println!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
