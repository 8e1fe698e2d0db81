#![no_main]
use childmask::ElasticBits;
use libfuzzer_sys::fuzz_target;

// Replay an arbitrary op sequence against a plain Vec<bool> model and demand
// identical bits and ranks afterwards. The model length is kept above the
// operated-on range so every op stays in bounds on both sides.
fuzz_target!(|data: Vec<(u8, u16, bool)>| {
    let mut bits = ElasticBits::new();
    let mut model = vec![false; 4096];

    for (op, raw_index, value) in data {
        let index = raw_index as usize % 2048;
        match op % 4 {
            0 => {
                bits.set(index);
                model[index] = true;
            }
            1 => {
                bits.clear(index);
                model[index] = false;
            }
            2 => {
                if model.len() < 16_384 {
                    bits.insert(index, value);
                    model.insert(index, value);
                }
            }
            _ => {
                if model.len() > 2048 {
                    assert_eq!(bits.remove(index), model.remove(index));
                }
            }
        }
    }

    for (i, &expected) in model.iter().enumerate() {
        assert_eq!(bits.get(i), expected, "bit {i}");
    }
    let total = model.iter().filter(|&&b| b).count();
    assert_eq!(bits.count_ones_before(model.len() + 64), total);
});
