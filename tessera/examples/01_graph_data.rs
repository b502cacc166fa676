mod common;

use chrono::Datelike;
use tessera::Tessera;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // Usage: 01_graph_data [github-user] [gitlab-user]
    let mut args = std::env::args().skip(1);
    let gh_user = args.next().unwrap_or_else(|| "octocat".to_string());
    let gl_user = args.next().unwrap_or_else(|| gh_user.clone());

    let (primary, secondary) = common::get_sources()?;
    let tessera = Tessera::builder()
        .with_primary(primary)
        .with_secondary(secondary)
        .default_primary_user(gh_user.clone())
        .default_secondary_user(gl_user.clone())
        .request_timeout(std::time::Duration::from_secs(20))
        .build()?;

    let this_year = tessera.today().year();
    println!("Fetching contributions for {gh_user} (GitHub) + {gl_user} (GitLab)...");
    let graphs = tessera
        .graph()
        .years(&[this_year, this_year - 1])?
        .full_year(true)
        .run()
        .await?;

    for g in &graphs {
        println!(
            "\n## {}: {} contributions across {} weeks",
            g.year,
            g.total_count,
            g.blocks.len()
        );
        let labels: Vec<String> = g
            .month_labels
            .iter()
            .map(|l| format!("{}@{}", l.label, l.x))
            .collect();
        println!("months: {}", labels.join(" "));

        // Seven text rows, Sunday first.
        for weekday in 0..7 {
            let row: String = g
                .blocks
                .iter()
                .map(|week| match week.get(weekday).and_then(|c| c.info.as_ref()) {
                    Some(r) if r.count == 0 => '.',
                    Some(r) if r.count < 5 => 'o',
                    Some(_) => 'O',
                    None => ' ',
                })
                .collect();
            println!("{row}");
        }
    }
    Ok(())
}
