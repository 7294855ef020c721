//! Catalog browsing.

use clap::Args;

use boutique_storefront::catalog::{ProductFilter, SortKey};
use boutique_storefront::config::StorefrontConfig;
use boutique_storefront::error::StorefrontError;
use boutique_storefront::views::CatalogPageView;

use super::{Output, load_catalog};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Product document (file path or URL); defaults to the configured base URL
    #[arg(long)]
    pub source: Option<String>,

    /// Size, e.g. `M`, `S-L` or `S, M, XL`
    #[arg(long)]
    pub size: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Only products on sale
    #[arg(long)]
    pub sale: bool,

    /// Case-insensitive name search
    #[arg(long)]
    pub search: Option<String>,

    /// `price-asc`, `price-desc`, `popularity` or `rating`
    #[arg(long, default_value = "default")]
    pub sort: SortKey,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

/// Run the pipeline and print one page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the page does not
/// exist.
pub async fn browse(
    config: &StorefrontConfig,
    args: &CatalogArgs,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut catalog = load_catalog(config, args.source.as_deref()).await?;

    catalog.filter(ProductFilter::from_form_values(
        args.size.as_deref(),
        args.color.as_deref(),
        args.category.as_deref(),
        args.sale,
    ));
    if let Some(term) = &args.search {
        catalog.search(term);
    }
    catalog.sort(args.sort);
    catalog.go_to_page(args.page).map_err(StorefrontError::from)?;

    let view = CatalogPageView::from(&catalog.page());
    output.emit(&view, || {
        if view.cards.is_empty() {
            println!("No products match.");
        }
        for card in &view.cards {
            let badge = card.badge.map_or_else(String::new, |badge| format!(" [{badge}]"));
            println!("{:>6}  {:<40} {:>10}{badge}", card.id, card.name, card.price);
        }
        println!();
        println!("{}  (page {} of {})", view.range, view.current_page, view.total_pages.max(1));
    })?;
    Ok(())
}
