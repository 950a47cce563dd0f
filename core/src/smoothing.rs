/// Fyller hull (`None`) med forrige (allerede reparerte) verdi.
///
/// Første element repareres aldri; mangler det, forplanter `None` seg videre
/// til første tallverdi. Returnerer antall verdier som ble fylt.
pub fn forward_fill(values: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    for i in 1..values.len() {
        if values[i].is_none() {
            values[i] = values[i - 1];
            if values[i].is_some() {
                filled += 1;
            }
        }
    }
    filled
}

/// Demper hopp: et indre punkt som avviker mer enn `threshold` fra forrige
/// punkt erstattes med forrige punkt. Én pass venstre→høyre, så en korrigert
/// verdi er sammenligningsgrunnlag for neste punkt (kaskade).
///
/// Første og siste punkt røres ikke. Høyre nabo påvirker ikke avgjørelsen.
/// Returnerer antall erstattede punkter.
pub fn suppress_outliers(values: &mut [Option<f64>], threshold: f64) -> usize {
    let mut suppressed = 0;
    for i in 1..values.len().saturating_sub(1) {
        if let (Some(prev), Some(curr)) = (values[i - 1], values[i]) {
            if (curr - prev).abs() > threshold {
                values[i] = Some(prev);
                suppressed += 1;
            }
        }
    }
    suppressed
}
