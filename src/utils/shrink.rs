use std::collections::TryReserveError;

/// Box-filter downsample by an integer `factor`.
///
/// Output dimensions are `width / factor` by `height / factor`; trailing
/// pixels that do not fill a whole box are dropped. A factor of 1 copies,
/// and a factor larger than either side yields an empty plane.
pub fn downsample(
    gray: &[u8],
    width: usize,
    height: usize,
    factor: usize,
) -> Result<(Vec<u8>, usize, usize), TryReserveError> {
    let factor = factor.max(1);
    let out_width = width / factor;
    let out_height = height / factor;

    let mut out = Vec::new();
    if out_width == 0 || out_height == 0 {
        return Ok((out, 0, 0));
    }
    out.try_reserve_exact(out_width * out_height)?;

    if factor == 1 {
        out.extend_from_slice(&gray[..width * height]);
        return Ok((out, out_width, out_height));
    }

    // factor <= min(width, height) here, so one box fits inside the plane
    let area = factor as u64 * factor as u64;
    for oy in 0..out_height {
        for ox in 0..out_width {
            let mut sum = 0u64;
            for dy in 0..factor {
                let row = (oy * factor + dy) * width + ox * factor;
                sum += gray[row..row + factor].iter().map(|&v| v as u64).sum::<u64>();
            }
            out.push((sum / area) as u8);
        }
    }

    Ok((out, out_width, out_height))
}
