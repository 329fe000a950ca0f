use heck::ToUpperCamelCase;

/// Suffix the CMSIS convention leaves on NVIC base names (`WWDG_IRQn` -> `WWDG_IRQ`).
const IRQ_SUFFIX: &str = "_IRQ";

pub trait ToCasing: Sized {
    fn to_upper_camel_case(&self) -> syn::Result<Self>;
}

impl ToCasing for syn::Ident {
    fn to_upper_camel_case(&self) -> syn::Result<Self> {
        let s = <str as ToUpperCamelCase>::to_upper_camel_case(&self.to_string());
        syn::parse_str::<syn::Ident>(&s)
            .map(|ident| syn::Ident::new(&ident.to_string(), self.span()))
            .map_err(|_| syn::Error::new(self.span(), format!("`{}` has no valid UpperCamelCase form", self)))
    }
}

/// `Interrupt` enum variant for an NVIC base name: `DMA1_Stream0_IRQ` -> `Dma1Stream0`.
pub fn interrupt_variant(base: &str) -> syn::Result<syn::Ident> {
    let trimmed = base.strip_suffix(IRQ_SUFFIX).unwrap_or(base);
    let ident: syn::Ident = syn::parse_str(trimmed)?;
    ident.to_upper_camel_case()
}
