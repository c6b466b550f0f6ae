//! BDD harness (cucumber-rs).
//!
//! Handler texts shared by the scenarios live here so step definitions stay short.

/// Handler shapes a scenario can place on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerShape {
    /// Hardcoded wildcard constant and a static preflight response.
    Wildcard,
    /// Already uses the shared helper.
    Migrated,
    /// Wildcard constant but no import statement to anchor the helper import.
    NoImports,
}

impl HandlerShape {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wildcard" => Some(HandlerShape::Wildcard),
            "migrated" => Some(HandlerShape::Migrated),
            "import-less" => Some(HandlerShape::NoImports),
            _ => None,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            HandlerShape::Wildcard => WILDCARD,
            HandlerShape::Migrated => MIGRATED,
            HandlerShape::NoImports => NO_IMPORTS,
        }
    }
}

const WILDCARD: &str = "import { serve } from 'https://deno.land/std@0.168.0/http/server.ts';
import { createClient } from 'https://esm.sh/@supabase/supabase-js@2';

const corsHeaders = {
  'Access-Control-Allow-Origin': '*',
  'Access-Control-Allow-Headers': 'authorization, x-client-info, apikey, content-type',
};

serve(async (req) => {
  if (req.method === 'OPTIONS') {
    return new Response(null, { headers: corsHeaders });
  }

  return new Response(JSON.stringify({ ok: true }), {
    headers: { ...corsHeaders, 'Content-Type': 'application/json' },
  });
});
";

const MIGRATED: &str = "import { serve } from 'https://deno.land/std@0.168.0/http/server.ts';
import { getCorsHeaders, handleCorsPrelight } from '../_shared/security.ts';

serve(async (req) => {
  const corsHeaders = getCorsHeaders(req);

  if (req.method === 'OPTIONS') {
    return handleCorsPrelight(req);
  }

  return new Response('ok', { headers: corsHeaders });
});
";

const NO_IMPORTS: &str = "const corsHeaders = { 'Access-Control-Allow-Origin': '*' };

Deno.serve(async (req) => {
  if (req.method === 'OPTIONS') {
    return new Response(null, { headers: corsHeaders });
  }
  return new Response('ok', { headers: corsHeaders });
});
";
