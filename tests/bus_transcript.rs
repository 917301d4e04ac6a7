use ad779x::{Ad779x, Ad779xError, Config, Mode, UpdateRate, Variant};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

/// CS toggles for `frames` selected transactions, after the deselect done by `new`
fn cs_expectations(frames: usize) -> Vec<PinTransaction> {
    let mut expectations = vec![PinTransaction::set(PinState::High)];
    for _ in 0..frames {
        expectations.push(PinTransaction::set(PinState::Low));
        expectations.push(PinTransaction::set(PinState::High));
    }
    expectations
}

/// One chip select window reading a register
fn read(command: u8, reply: Vec<u8>) -> Vec<SpiTransaction<u8>> {
    vec![
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![command]),
        SpiTransaction::transfer_in_place(vec![0x00; reply.len()], reply),
        SpiTransaction::transaction_end(),
    ]
}

/// One chip select window writing a register
fn write(command: u8, payload: Vec<u8>) -> Vec<SpiTransaction<u8>> {
    vec![
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![command]),
        SpiTransaction::write_vec(payload),
        SpiTransaction::transaction_end(),
    ]
}

fn init_expectations(id: u8) -> Vec<SpiTransaction<u8>> {
    let mut expectations = vec![
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0xFF, 0xFF, 0xFF, 0xFF]),
        SpiTransaction::transaction_end(),
    ];
    expectations.extend(read(0x60, vec![id]));
    expectations
}

#[test]
fn init_and_read_on_ad7793() {
    let mut expectations = init_expectations(0x4B);
    // Configuration register, channel AIN2
    expectations.extend(write(0x10, vec![0x10, 0x91]));
    // Single conversion at 10 Hz
    expectations.extend(write(0x08, vec![0x20, 0x0C]));
    // Busy once, then ready
    expectations.extend(read(0x40, vec![0x88]));
    expectations.extend(read(0x40, vec![0x08]));
    // Data register
    expectations.extend(read(0x58, vec![0x80, 0x00, 0x01]));

    let spi = SpiMock::new(&expectations);
    let cs = PinMock::new(&cs_expectations(7));

    let mut adc = Ad779x::new(spi, cs, NoopDelay::new(), Config::default()).unwrap();
    adc.init().unwrap();
    assert_eq!(adc.variant(), Variant::Ad7793);
    assert_eq!(adc.read(1).unwrap(), 0x800001);

    let (mut spi, mut cs, _delay) = adc.release();
    spi.done();
    cs.done();
}

#[test]
fn init_and_read_on_ad7792() {
    let mut expectations = init_expectations(0x4A);
    expectations.extend(write(0x10, vec![0x10, 0x92]));
    expectations.extend(write(0x08, vec![0x20, 0x0C]));
    expectations.extend(read(0x40, vec![0x00]));
    expectations.extend(read(0x58, vec![0xAB, 0xCD]));

    let spi = SpiMock::new(&expectations);
    let cs = PinMock::new(&cs_expectations(6));

    let mut adc = Ad779x::new(spi, cs, NoopDelay::new(), Config::default()).unwrap();
    adc.init().unwrap();
    assert_eq!(adc.variant(), Variant::Ad7792);
    // Channel 7 is out of range and reads AIN3
    assert_eq!(adc.read(7).unwrap(), 0xABCD);

    let (mut spi, mut cs, _delay) = adc.release();
    spi.done();
    cs.done();
}

#[test]
fn read_before_init_touches_nothing() {
    let expectations: Vec<SpiTransaction<u8>> = Vec::new();
    let spi = SpiMock::new(&expectations);
    let cs = PinMock::new(&cs_expectations(0));

    let mut adc = Ad779x::new(spi, cs, NoopDelay::new(), Config::default()).unwrap();
    assert!(matches!(adc.read(0), Err(Ad779xError::NotInitialized)));

    let (mut spi, mut cs, _delay) = adc.release();
    spi.done();
    cs.done();
}

#[test]
fn busy_chip_times_out() {
    let mut expectations = Vec::new();
    for _ in 0..2 {
        expectations.extend(read(0x40, vec![0x80]));
    }

    let spi = SpiMock::new(&expectations);
    let cs = PinMock::new(&cs_expectations(2));
    let config = Config::default().with_max_polls(2);

    let mut adc = Ad779x::new(spi, cs, NoopDelay::new(), config).unwrap();
    assert!(matches!(adc.poll_ready(), Err(Ad779xError::Timeout)));

    let (mut spi, mut cs, _delay) = adc.release();
    spi.done();
    cs.done();
}

#[test]
fn mode_and_excitation_writes() {
    let mut expectations = write(0x08, vec![0x60, 0x0F]);
    expectations.extend(write(0x28, vec![0x03]));
    expectations.extend(write(0x28, vec![0x00]));

    let spi = SpiMock::new(&expectations);
    let cs = PinMock::new(&cs_expectations(3));

    let mut adc = Ad779x::new(spi, cs, NoopDelay::new(), Config::default()).unwrap();
    adc.trigger_conversion(Mode::PowerDown, UpdateRate::Hz4_17)
        .unwrap();
    adc.set_excitation_current(3).unwrap();
    adc.set_excitation_current(9).unwrap();

    let (mut spi, mut cs, _delay) = adc.release();
    spi.done();
    cs.done();
}
