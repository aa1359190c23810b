use orient_fusion::{
    Acceleration, AngleUnit, AngularRate, CalibrationSettings, OrientationProcessor, StdClock,
    StdDelay,
};

const TICKS: usize = 50;
const TICK: std::time::Duration = std::time::Duration::from_millis(10);

// Stand-ins for a sensor driver; replace with real readings
fn read_accelerometer() -> Acceleration {
    Acceleration::new(-1.7, 0.0, 9.66) // m/s², tilted about 10° nose up
}

fn read_gyroscope() -> AngularRate {
    AngularRate::new(0.004, -0.006, 0.001) // rad/s, bias only
}

fn main() {
    let mut processor = OrientationProcessor::new(StdClock::new());

    println!("Calibrating gyroscope - keep device still...");
    let offset =
        processor.calibrate_gyro(read_gyroscope, &mut StdDelay, CalibrationSettings::default());
    println!(
        "Gyroscope offset: ({:.4}, {:.4}, {:.4}) rad/s",
        offset.x(),
        offset.y(),
        offset.z()
    );

    for _ in 0..TICKS {
        // this loop should repeat each time new sensor data is available
        if processor
            .update(read_accelerometer(), read_gyroscope())
            .is_some()
        {
            let angles = processor.orientation(AngleUnit::Degrees);
            println!("Pitch: {:.2}, Roll: {:.2}", angles.pitch, angles.roll);
        }
        std::thread::sleep(TICK);
    }
}
