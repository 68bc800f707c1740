fn main() -> Result<(), Box<dyn std::error::Error>> {
    let param_tokens: Vec<String> = std::env::args().collect();
    let csv_path = param_tokens
        .get(1)
        .ok_or("You should specify exactly one benchmark CSV file")?;

    // Collect (benchmark, CPI) pairs, skipping failed runs
    let mut data: Vec<(String, f64)> = Vec::new();
    let mut reader = csv::Reader::from_path(csv_path)?;
    for record in reader.records() {
        let record = record?;
        let benchmark = record.get(0).ok_or("Missing benchmark column")?;
        let cpi = match record.get(1) {
            Some(value) => match value.parse::<f64>() {
                Ok(cpi) => cpi,
                Err(_) => continue,
            },
            None => continue,
        };
        data.push((benchmark.to_string(), cpi));
    }

    if data.is_empty() {
        return Err("No successful benchmark rows to plot".into());
    }

    let y_max = data.iter().map(|(_, cpi)| *cpi).fold(0.0, f64::max);

    // Plot the data
    use plotters::prelude::*;

    let csv_base_name = String::from(csv_path.split('/').last().unwrap());
    let plot_title = format!("Benchmark evaluation (CPI): {}", csv_base_name);
    let output_path = format!("eval/bench_plot_{}.svg", csv_base_name);

    let root = SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..data.len() as i32, 0.0..y_max * 1.1)
        .unwrap();
    ctx.configure_mesh()
        .x_desc("Benchmark #")
        .y_desc("CPI")
        .draw()
        .unwrap();

    let series = data.iter().enumerate().map(|(i, (_, cpi))| (i as i32, *cpi));
    ctx.draw_series(LineSeries::new(series, BLUE.to_rgba()))
        .unwrap()
        .label("CPI")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], BLUE.to_rgba())
        });

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();

    // Leave the name -> index mapping on stderr for reading the chart
    for (i, (benchmark, cpi)) in data.iter().enumerate() {
        eprintln!("{}: {} (CPI = {:.3})", i, benchmark, cpi);
    }

    Ok(())
}
