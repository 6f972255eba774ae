#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use gasmeter_core::config::SamplerConfig;
use gasmeter_core::sampling::Sampler;
use gasmeter_firmware::console::RttConsole;
use log::{info, warn};

#[cfg(all(feature = "variant-sensor", feature = "variant-placeholder"))]
compile_error!("enable only one of `variant-sensor` and `variant-placeholder`");

#[cfg(not(any(feature = "variant-sensor", feature = "variant-placeholder")))]
compile_error!("enable one of `variant-sensor` or `variant-placeholder`");

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Never raised on hardware; the sampler runs until reset.
static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Variant defaults plus the optional `.env` interval override
fn sampler_config(base: SamplerConfig) -> SamplerConfig {
    match option_env!("GASMETER_SAMPLE_INTERVAL_MS") {
        Some(raw) => base.with_interval_override(raw).unwrap_or_else(|| {
            warn!(
                "Ignoring GASMETER_SAMPLE_INTERVAL_MS={:?}, using {} ms",
                raw,
                base.interval_ms()
            );
            base
        }),
        None => base,
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_print!();
    rtt_target::init_logger();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // The sampler is the only task
    let _ = spawner;

    #[cfg(feature = "variant-sensor")]
    let summary = {
        use gasmeter_core::sensors::Mq7Sensor;
        use gasmeter_firmware::adc::Mq7AdcInput;

        let config = sampler_config(SamplerConfig::sensor());
        let input = Mq7AdcInput::new(peripherals.ADC1, peripherals.GPIO34);
        let sensor = Mq7Sensor::new(input, config.adc);

        let mut sampler = Sampler::new(sensor, RttConsole, embassy_time::Delay, config);
        sampler.run(&SHUTDOWN).await
    };

    #[cfg(feature = "variant-placeholder")]
    let summary = {
        use gasmeter_core::sensors::PlaceholderSensor;

        let config = sampler_config(SamplerConfig::placeholder());

        let mut sampler = Sampler::new(PlaceholderSensor, RttConsole, embassy_time::Delay, config);
        sampler.run(&SHUTDOWN).await
    };

    warn!("Sampler returned: {:?}", summary);

    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
