use plp_rasta::analyzer::plp_analyzer::{PlpAnalyzer, PlpError};
use plp_rasta::common::config::PlpConfig;
use plp_rasta::common::scaler::Scaler;
use simple_logger::SimpleLogger;

#[macro_use]
extern crate log;

const NUM_BANDS: usize = 26;
const NUM_FRAMES: usize = 300;

// Extracts RASTA-PLP features from a synthetic critical-band stream: two
// vowel-like spectral peaks riding on a slow channel gain drift that the
// RASTA filter is there to remove.
fn main() -> Result<(), PlpError> {
    SimpleLogger::new().init().unwrap();

    let config = PlpConfig::rasta_plp(NUM_BANDS, 12, 13);
    let mut scaler_buf = vec![0.0; PlpAnalyzer::calc_working_buffer_length(&config)];
    let (mut analyzer, _) = PlpAnalyzer::new(config, &mut scaler_buf).expect("valid configuration");

    info!(
        "extracting {} coefficients per frame from {} bands",
        analyzer.output_len(),
        NUM_BANDS
    );

    let mut features = vec![0.0 as Scaler; analyzer.output_len()];
    for frame in 0..NUM_FRAMES {
        let bands = synth_frame(frame);
        analyzer.process_frame(&bands, &mut features)?;

        if frame % 50 == 0 {
            info!(
                "frame {:3}: c1..c4 = {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
                frame, features[0], features[1], features[2], features[3]
            );
        }
    }

    info!(
        "done: {} frames, {} table build(s)",
        analyzer.frame_index(),
        analyzer.table_build_count()
    );
    Ok(())
}

fn synth_frame(frame: usize) -> Vec<Scaler> {
    // channel gain drifting at ~0.2 Hz, far below the RASTA passband
    let drift = 1.0 + 0.5 * (frame as Scaler * 0.0126).sin();

    (0..NUM_BANDS)
        .map(|band| {
            let b = band as Scaler;
            let formant1 = 8.0 / (1.0 + (b - 5.0) * (b - 5.0));
            let formant2 = 3.0 / (1.0 + (b - 15.0) * (b - 15.0) * 0.5);
            drift * (formant1 + formant2 + 0.05)
        })
        .collect()
}
