#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

// Wiring (Mega2560):
//   keypad rows d22-d25 (driven), columns d26-d29 (pull-up)
//   LCD RS d30, EN d31, DB0-DB7 d32-d39, RW → GND
//   speaker d50 (PB3)
//   serial log on USART0 (d0/d1)

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    use arduino_hal::Delay;
    use jukebox::config::SERIAL_BAUD;
    use jukebox::keypad::Keypad4x4;
    use jukebox::lcd1602::Lcd1602;
    use jukebox::playback::PlaybackEngine;
    use jukebox::songs::CATALOG;
    use jukebox::Jukebox;

    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    // serial interface
    let serial = arduino_hal::default_serial!(dp, pins, SERIAL_BAUD);

    let rows = [
        pins.d22.into_output().downgrade(),
        pins.d23.into_output().downgrade(),
        pins.d24.into_output().downgrade(),
        pins.d25.into_output().downgrade(),
    ];
    let cols = [
        pins.d26.into_pull_up_input().downgrade(),
        pins.d27.into_pull_up_input().downgrade(),
        pins.d28.into_pull_up_input().downgrade(),
        pins.d29.into_pull_up_input().downgrade(),
    ];
    let keypad = Keypad4x4::new(rows, cols, Delay::new());

    let db = [
        pins.d32.into_output().downgrade(),
        pins.d33.into_output().downgrade(),
        pins.d34.into_output().downgrade(),
        pins.d35.into_output().downgrade(),
        pins.d36.into_output().downgrade(),
        pins.d37.into_output().downgrade(),
        pins.d38.into_output().downgrade(),
        pins.d39.into_output().downgrade(),
    ];
    let mut lcd = Lcd1602::new(pins.d30.into_output().downgrade(), pins.d31.into_output().downgrade(), db, Delay::new());
    lcd.init();

    let engine = PlaybackEngine::new(pins.d50.into_output(), Delay::new());

    let mut jukebox = Jukebox::new(&CATALOG, lcd, keypad, engine, serial);
    jukebox.start();

    // Only an out-of-range catalog index gets here; it's already on the LCD and serial.
    let _fatal = jukebox.run();
    loop {
        arduino_hal::delay_ms(1000);
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("jukebox is AVR firmware; build it for avr-none (atmega2560). `cargo test` runs the host tests.");
}
