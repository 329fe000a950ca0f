use quote::{quote, ToTokens};

/// Compile-time check that a field of a `#[repr(C)]` struct starts `word_offset` pointer-sized
/// words into it.
pub struct OffsetAssertion {
    pub struct_ident: syn::Ident,
    pub field_ident: syn::Ident,
    pub word_offset: usize,
}

impl ToTokens for OffsetAssertion {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let struct_ident = &self.struct_ident;
        let field_ident = &self.field_ident;
        let word_offset = proc_macro2::Literal::usize_unsuffixed(self.word_offset);
        tokens.extend(quote! {
            const _: () = assert!(
                core::mem::offset_of!(#struct_ident, #field_ident)
                    == #word_offset * core::mem::size_of::<usize>()
            );
        });
    }
}
